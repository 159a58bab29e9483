//! Property-based tests.

mod planner_props;
mod refine_props;

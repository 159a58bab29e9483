//! Integration tests against mocked HTTP servers.

//! Engine-level tests: gesture properties, the multi-user scenario and
//! session runs against the in-memory store.

mod gesture_tests;

//! Property-based tests for the estimator and session store.

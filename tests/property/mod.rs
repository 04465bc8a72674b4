//! Property-based tests

mod assignment_props;
mod schedule_props;

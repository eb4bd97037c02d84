//! Unit tests kept out of the implementation files they cover.

mod control_tests;

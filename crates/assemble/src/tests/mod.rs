mod builder_tests;
mod helpers;

// src/matching/tests/mod.rs

mod support;

mod provisioner_tests;

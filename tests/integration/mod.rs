//! Integration Tests Module
//!
//! End-to-end tests for the instruction & guidance resolution engine:
//! corpus loading from source directories, instruction routing with a
//! stubbed decision delegate, model matching, and guidance composition.

// Corpus loading and query tests
mod corpus_test;

// Instruction router end-to-end tests
mod router_test;

// Model matcher scenario tests
mod matcher_test;

// Guidance composition pipeline tests
mod guidance_test;

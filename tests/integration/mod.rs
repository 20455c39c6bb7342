//! Integration tests for rs-linkpreview
//!
//! End-to-end runs of the extraction pipeline on inputs at the edges of
//! what real pages look like.

mod edge_cases;

//! Export scenarios and export/parse round trips.

mod pascal_voc_tests;
mod roundtrip_tests;

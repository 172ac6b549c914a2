//! Forces dynamic linking of `sprack_internal` when the `dynamic_linking` feature is enabled.

#![allow(unused_imports)]
use sprack_internal;

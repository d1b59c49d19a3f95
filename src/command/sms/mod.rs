//! ### 9 - Short Messages Service
pub mod urc;

//! Applications: apply with a PDF, withdraw, replace the file, review
//! listings and status changes, AI CV analysis, and a text viewer.

pub mod analysis;
pub mod handlers;
pub mod upload;
pub mod viewer;

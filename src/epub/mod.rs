//! EPUB plumbing: unpack the archive, find the package document and list its
//! content documents in reading order.

pub mod archive;
pub mod container;
pub mod package;

pub use archive::extract;
pub use container::{find_rootfile, CONTAINER_PATH};
pub use package::Spine;

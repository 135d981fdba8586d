/// Inverse pipeline reconstructing frames from objects
pub mod frames;
/// Content-addressed object library
pub mod library;
/// Forward pipeline extracting objects from frames
pub mod objects;
/// Placement records, object ids and frames
pub mod placement;

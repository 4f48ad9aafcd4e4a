mod octree_node;
mod node_pool;
mod octree;

pub use octree_node::*;
pub use node_pool::*;
pub use octree::*;

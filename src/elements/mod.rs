//! Structural records handed to the analysis engine

mod material;
mod member;
mod node;
mod section;

pub use material::Material;
pub use member::{Member, MemberRole};
pub use node::Node;
pub use section::Section;

//! Content collections: loading, rendering, and metadata schemas

pub mod collection;
pub mod frontmatter;
pub mod job;
pub mod markdown;
pub mod post;

pub use collection::{Collection, Item};
pub use job::{EmploymentType, Job, JobEnd, JobMetadata};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostMetadata};

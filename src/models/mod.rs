mod post;

pub use post::{ListResponse, NewPost, Post, PostEnvelope, PostPage, UNTITLED_POST};

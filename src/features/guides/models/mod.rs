mod guide;

pub use guide::Guide;

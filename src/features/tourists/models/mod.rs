mod tourist;

pub use tourist::Tourist;

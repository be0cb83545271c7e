mod province;

pub use province::Province;

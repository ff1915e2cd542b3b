mod fragment;

pub mod build;

pub use fragment::Fragment;

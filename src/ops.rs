pub mod concat_eager;
pub mod map;

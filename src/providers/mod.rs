pub mod ecb;

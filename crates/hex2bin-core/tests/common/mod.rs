pub mod util_fs;

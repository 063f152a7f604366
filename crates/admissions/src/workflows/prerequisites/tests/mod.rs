mod common;
mod details;

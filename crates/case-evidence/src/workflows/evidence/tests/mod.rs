mod common;
mod focus;

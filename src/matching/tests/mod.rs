mod common;
mod consultants;

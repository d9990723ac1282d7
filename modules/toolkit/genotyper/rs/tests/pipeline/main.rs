mod batch;
mod calls;
mod fixtures;

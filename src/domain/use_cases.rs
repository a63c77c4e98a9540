pub mod employment;

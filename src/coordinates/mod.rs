pub mod frame_transformation;

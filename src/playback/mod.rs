pub mod confinement;
pub mod gst_transport;
pub mod recheck;
pub mod transport;

#[cfg(test)]
pub mod recording;

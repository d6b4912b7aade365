// Domain layer: post and site models plus the ports the publishing core talks to.

pub mod model;
pub mod ports;

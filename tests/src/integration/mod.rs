//! Integration tests spanning the ingress pipeline, the cube network and
//! the hub runtime.

mod pipeline;
mod simulation;

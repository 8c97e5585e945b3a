#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Translates a Kubernetes Ingress into an Istio VirtualService.
//!
//! This crate holds only plain data and the mapping between them. Fetching
//! and persisting resources is the caller's concern.

mod error;
pub mod ingress;
mod mapping;
pub mod virtual_service;


pub use self::{
    error::MappingError,
    ingress::{Backend, IngressPath, IngressRule, IngressSpec, ServicePort},
    mapping::map,
    virtual_service::{Destination, HttpRoute, RouteAction, VirtualServiceSpec},
};

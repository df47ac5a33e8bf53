//! # Reflective Field Access
//!
//! A second codec surface for packets that arrive as host-owned objects
//! instead of raw bytes. Fields are addressed by declared type and ordinal,
//! resolved once and cached, and every version-gated accessor goes through
//! the capability gate before touching the object.
//!
//! ## Components
//! - **Host**: the object model a host runtime exposes (shapes, values, enums)
//! - **Cache**: process-wide resolved handles, populated idempotently
//! - **Wrapper**: typed ordinal access and enum resolution over one object
//! - **UseEntity**: the use-entity packet view built on the wrapper

pub mod cache;
pub mod host;
pub mod use_entity;
pub mod wrapper;

pub use host::{
    ClassShape, DynamicObject, EnumConstant, EnumType, FieldDecl, FieldType, HostEntity,
    HostObject, HostRuntime, HostValue,
};
pub use use_entity::WrappedUseEntity;
pub use wrapper::{resolve_enum_type, ReflectiveWrapper};

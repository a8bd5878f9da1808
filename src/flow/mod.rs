//! Survey page flow — pages, events, and the pure transition function.

pub mod event;
pub mod machine;
pub mod page;

pub use event::{
    CommercialVehicle, Demographics, DemographicsForm, Event, OwnershipAnswer, PrivateVehicle,
    VehicleForm, VehicleInfo,
};
pub use machine::{Effect, FlowContext, Transition, transition};
pub use page::Page;

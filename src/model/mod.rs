pub use embryogen_core::{
    init_logging, AppConfig, Census, EngineError, EngineMode, EngineSnapshot, Parameters,
    SimulationEngine, TickReport,
};
pub mod config {
    pub use embryogen_core::config::*;
}
pub mod engine {
    pub use embryogen_core::engine::*;
}
pub mod template {
    pub use embryogen_core::template::*;
}
pub mod morphogen {
    pub use embryogen_core::morphogen::*;
}
pub mod lattice {
    pub use embryogen_core::lattice::*;
}
pub mod spatial_hash {
    pub use embryogen_core::spatial_hash::*;
}
pub mod adhesion {
    pub use embryogen_core::adhesion::*;
}
pub mod clock {
    pub use embryogen_core::clock::*;
}
pub mod snapshot {
    pub use embryogen_core::snapshot::*;
}
pub mod systems {
    pub use embryogen_core::systems::*;
}
pub mod tissue {
    pub use embryogen_core::tissue::*;
}

pub mod state {
    pub use embryogen_data::*;
}

pub mod imitation;
pub mod replicator_bimatrix;

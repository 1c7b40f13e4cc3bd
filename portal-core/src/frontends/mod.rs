
// Embedded UI for deployment, disk UI for local development.
pub mod provider_disk;
pub mod provider_embed;

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawNode {
    pub node_id: String,
    pub zone_id: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawLink {
    pub link_id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    pub length: Option<f64>,
    pub free_speed: Option<f64>,
    pub allowed_uses: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawDemand {
    pub agent_id: String,
    pub o_node_id: String,
    pub d_node_id: String,
}

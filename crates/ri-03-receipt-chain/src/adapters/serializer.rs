use crate::domain::entities::ChainNode;
use crate::domain::errors::SerializationError;
use crate::ports::outbound::ReceiptSerializer;
use shared_types::TxHash;

/// Default receipt codec using bincode.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeReceiptSerializer;

impl ReceiptSerializer for BincodeReceiptSerializer {
    fn encode_node(&self, node: &ChainNode) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(node).map_err(|e| SerializationError::new(e.to_string()))
    }

    fn decode_node(&self, data: &[u8]) -> Result<ChainNode, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError::new(e.to_string()))
    }

    fn encode_hashes(&self, hashes: &[TxHash]) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(hashes).map_err(|e| SerializationError::new(e.to_string()))
    }

    fn decode_hashes(&self, data: &[u8]) -> Result<Vec<TxHash>, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError::new(e.to_string()))
    }
}

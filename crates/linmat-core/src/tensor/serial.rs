//! Serde support. A tensor travels as `{ "data": [...], "dims": [...] }`;
//! strides are recomputed and the shape is checked on the way in.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Tensor;

#[derive(Serialize)]
struct TensorRef<'a, T> {
    data: &'a [T],
    dims: &'a [usize],
}

#[derive(Deserialize)]
struct TensorData<T> {
    data: Vec<T>,
    dims: Vec<usize>,
}

impl<T: Serialize> Serialize for Tensor<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TensorRef {
            data: &self.data,
            dims: &self.dims,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tensor<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = TensorData::deserialize(deserializer)?;
        Tensor::from_vec(raw.data, raw.dims).map_err(D::Error::custom)
    }
}

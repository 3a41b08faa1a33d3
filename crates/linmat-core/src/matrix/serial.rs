//! Serde support. A matrix serializes as its tensor and is rejected on the
//! way in unless that tensor is two-dimensional.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tensor::Tensor;

use super::Matrix;

impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tensor.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Matrix<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tensor = Tensor::deserialize(deserializer)?;
        Matrix::from_tensor(tensor).map_err(D::Error::custom)
    }
}

use bytes::Bytes;

use super::error::RecordError;
use super::traits::{Marshal, MergePolicy, Unmarshal};
use crate::bencode::{Value, ValueKind};

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Marshal for $ty {
            fn marshal(&self) -> Result<Value, RecordError> {
                i64::try_from(*self)
                    .map(Value::Integer)
                    .map_err(|_| RecordError::IntegerOutOfRange {
                        value: *self as i128,
                        target: "i64",
                    })
            }
        }

        impl Unmarshal for $ty {
            fn shape(&self) -> Option<ValueKind> {
                Some(ValueKind::Integer)
            }

            fn unmarshal(&mut self, value: &Value, _policy: MergePolicy) -> Result<(), RecordError> {
                let n = value.try_integer()?;
                *self = <$ty>::try_from(n).map_err(|_| RecordError::IntegerOutOfRange {
                    value: i128::from(n),
                    target: stringify!($ty),
                })?;
                Ok(())
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Marshal for str {
    fn marshal(&self) -> Result<Value, RecordError> {
        Ok(Value::string(self))
    }
}

impl Marshal for String {
    fn marshal(&self) -> Result<Value, RecordError> {
        Ok(Value::string(self))
    }
}

impl Unmarshal for String {
    fn shape(&self) -> Option<ValueKind> {
        Some(ValueKind::Bytes)
    }

    fn unmarshal(&mut self, value: &Value, _policy: MergePolicy) -> Result<(), RecordError> {
        let bytes = value.try_bytes()?;
        *self = std::str::from_utf8(bytes)?.to_owned();
        Ok(())
    }
}

impl Marshal for Bytes {
    fn marshal(&self) -> Result<Value, RecordError> {
        Ok(Value::Bytes(self.clone()))
    }
}

impl Unmarshal for Bytes {
    fn shape(&self) -> Option<ValueKind> {
        Some(ValueKind::Bytes)
    }

    fn unmarshal(&mut self, value: &Value, _policy: MergePolicy) -> Result<(), RecordError> {
        *self = value.try_bytes()?.clone();
        Ok(())
    }
}

impl Marshal for Value {
    fn marshal(&self) -> Result<Value, RecordError> {
        Ok(self.clone())
    }
}

impl Unmarshal for Value {
    fn shape(&self) -> Option<ValueKind> {
        None
    }

    fn unmarshal(&mut self, value: &Value, _policy: MergePolicy) -> Result<(), RecordError> {
        *self = value.clone();
        Ok(())
    }
}

impl<T: Marshal + ?Sized> Marshal for &T {
    fn marshal(&self) -> Result<Value, RecordError> {
        (**self).marshal()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: Marshal> Marshal for Option<T> {
    fn marshal(&self) -> Result<Value, RecordError> {
        match self {
            Some(value) => value.marshal(),
            None => Err(RecordError::MissingValue),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: Unmarshal + Default> Unmarshal for Option<T> {
    fn shape(&self) -> Option<ValueKind> {
        match self {
            Some(value) => value.shape(),
            None => T::default().shape(),
        }
    }

    fn unmarshal(&mut self, value: &Value, policy: MergePolicy) -> Result<(), RecordError> {
        self.get_or_insert_with(T::default).unmarshal(value, policy)
    }
}

/// Every element is written, so an absent one fails with
/// [`RecordError::MissingValue`] instead of shifting the indices after it.
impl<T: Marshal> Marshal for Vec<T> {
    fn marshal(&self) -> Result<Value, RecordError> {
        self.iter()
            .map(|item| item.marshal())
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

impl<T: Unmarshal + Default> Unmarshal for Vec<T> {
    fn shape(&self) -> Option<ValueKind> {
        Some(ValueKind::List)
    }

    /// Replaces the vector with the decoded list.
    ///
    /// The element kind is taken from the first element and every later
    /// element must share it, unless the element type accepts any value.
    fn unmarshal(&mut self, value: &Value, policy: MergePolicy) -> Result<(), RecordError> {
        let list = value.try_list()?;
        let Some(first) = list.first() else {
            self.clear();
            return Ok(());
        };
        let kind = first.kind();

        let mut decoded = Vec::with_capacity(list.len());
        for (index, item) in list.iter().enumerate() {
            let mut element = T::default();
            if let Some(accepted) = element.shape() {
                let found = item.kind();
                if accepted != kind || found != kind {
                    return Err(RecordError::ElementMismatch {
                        index,
                        expected: accepted,
                        found,
                    });
                }
            }
            element.unmarshal(item, policy)?;
            decoded.push(element);
        }

        *self = decoded;
        Ok(())
    }
}

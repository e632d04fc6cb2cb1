use bytes::Bytes;

pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    fn deserialize(bytes: Bytes) -> anyhow::Result<Self>
    where
        Self: Sized;
}

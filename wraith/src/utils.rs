use heapless::Vec as InlineVec;
use serde::de::Error;
use serde::ser::SerializeSeq;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;

/// Serializes a bank of byte arrays as a sequence of byte strings.
pub(crate) fn serialize_slices_as_one<Sl: AsRef<[u8]>, Se: Serializer>(
    slices: &[Sl],
    ser: Se,
) -> Result<Se::Ok, Se::Error> {
    let mut seq = ser.serialize_seq(Some(slices.len()))?;
    slices
        .iter()
        .map(AsRef::as_ref)
        .try_for_each(|b| seq.serialize_element(b))
        .and_then(|()| seq.end())
}

/// The inverse of [`serialize_slices_as_one`]. Fails if the number of banks or the size of any
/// bank does not match.
pub(crate) fn deserialize_slices_as_one<
    'de,
    const N: usize,
    const M: usize,
    De: Deserializer<'de>,
>(
    de: De,
) -> Result<[[u8; N]; M], De::Error> {
    let banks = InlineVec::<InlineVec<u8, N>, M>::deserialize(de)?;
    if banks.len() != M {
        return Err(De::Error::invalid_length(banks.len(), &"every memory bank"));
    }
    let mut digest = [[0; N]; M];
    for (slot, bank) in digest.iter_mut().zip(banks) {
        *slot = bank
            .into_array()
            .map_err(|bank| De::Error::invalid_length(bank.len(), &"a full memory bank"))?;
    }
    Ok(digest)
}

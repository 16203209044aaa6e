use crate::utils::{
    nom_helper::{nom_unsigned_four_bytes, Endian},
    strings::extract_utf8_string,
};
use log::warn;
use nom::{
    bytes::complete::{take, take_while},
    Needed,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkNetwork {
    pub(crate) size: u32,
    pub(crate) flags: u32,
    pub(crate) share_name_offset: u32,
    pub(crate) device_name_offset: u32,
    pub(crate) provider_type: u32,
    pub(crate) share_name: String,
}

impl LnkNetwork {
    /// Parse the network volume table from `shortcut` data
    pub(crate) fn parse_network(data: &[u8]) -> nom::IResult<&[u8], LnkNetwork> {
        let (_, size) = nom_unsigned_four_bytes(data, Endian::Le)?;

        // Five u32 fields before the share name
        let min_size = 20;
        if size < min_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (remaining_input, network_data) = take(size)(data)?;

        let (input, _) = nom_unsigned_four_bytes(network_data, Endian::Le)?;
        let (input, flags) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, share_name_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, device_name_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (_, provider_type) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let mut network = LnkNetwork {
            size,
            flags,
            share_name_offset,
            device_name_offset,
            provider_type,
            share_name: String::new(),
        };

        if share_name_offset > size {
            warn!("[shortcuts] Network share name offset {share_name_offset} is past the table size {size}");
            return Ok((remaining_input, network));
        }

        let (share_name_start, _) = take(share_name_offset)(network_data)?;
        let end_of_string = 0;
        let (_, share_name_data) = take_while(|b| b != end_of_string)(share_name_start)?;
        network.share_name = extract_utf8_string(share_name_data);

        Ok((remaining_input, network))
    }
}

#![cfg(feature = "serde")]

use mpin::{
    combine_client_secret, extract_token, generate_master_secret_share, get_client_secret_share,
    get_time_permit_share, combine_time_permit, hash_identity, ClientMessage, Client, EpochDay,
    HashAlgorithm, OsRng, Result, Scalar, ServerMessage, SessionParams,
};

const IDENTITY: &[u8] = b"jlpicard_1701";
const DAY: EpochDay = EpochDay::new(20_000);

fn commitment() -> Result<ClientMessage> {
    let ms = generate_master_secret_share(&mut OsRng);
    let hcid = hash_identity(HashAlgorithm::Sha256, IDENTITY);
    let cs = combine_client_secret([&get_client_secret_share(&ms, &hcid)])?;
    let permit = combine_time_permit([&get_time_permit_share(
        HashAlgorithm::Sha256,
        DAY,
        &ms,
        &hcid,
    )])?;
    let token = extract_token(HashAlgorithm::Sha256, IDENTITY, 4321, &cs)?;

    let params = SessionParams::new(HashAlgorithm::Sha256).with_time_permits(DAY);
    let (_, message) = Client::new(OsRng).pass1(params, IDENTITY, 4321, &token, Some(&permit))?;
    Ok(message)
}

#[test]
fn test_client_message_postcard() -> Result<()> {
    let message = commitment()?;
    let bytes = postcard::to_allocvec(&message).unwrap();
    let decoded: ClientMessage = postcard::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, message);
    Ok(())
}

#[test]
fn test_client_message_bincode() -> Result<()> {
    let message = commitment()?;
    let bytes = bincode::serialize(&message).unwrap();
    let decoded: ClientMessage = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, message);
    Ok(())
}

#[test]
fn test_server_message_round_trip() {
    let message = ServerMessage::Challenge(Scalar::from(1_234_567u64));
    let bytes = postcard::to_allocvec(&message).unwrap();
    let decoded: ServerMessage = postcard::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_zero_challenge_is_not_deserialised() {
    let message = ServerMessage::Challenge(Scalar::from(1u64));
    let mut bytes = postcard::to_allocvec(&message).unwrap();
    // variant tag, then the little-endian scalar
    bytes[1] = 0;
    assert!(postcard::from_bytes::<ServerMessage>(&bytes).is_err());
}

#[test]
fn test_corrupt_point_is_not_deserialised() -> Result<()> {
    let message = commitment()?;
    let mut bytes = bincode::serialize(&message).unwrap();
    // bincode: 4 byte variant tag, then the compressed U
    for b in &mut bytes[4..4 + 48] {
        *b = 0x42;
    }
    assert!(bincode::deserialize::<ClientMessage>(&bytes).is_err());
    Ok(())
}

#[test]
fn test_session_params_round_trip() {
    let params = SessionParams::new(HashAlgorithm::Sha512).with_time_permits(DAY);
    let bytes = postcard::to_allocvec(&params).unwrap();
    let decoded: SessionParams = postcard::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, params);
}

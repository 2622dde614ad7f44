use mpin::{
    combine_client_secret, combine_server_secret, combine_time_permit, extract_token,
    generate_master_secret_share, get_client_secret_share, get_server_secret_share,
    get_time_permit_share, hash_identity, Client, ClientMessage, EpochDay, HashAlgorithm,
    MasterSecretShare, OsRng, Result, Server, ServerMessage, SessionParams, Verdict,
};
use std::time::Instant;

/// serialise a message into the buffer, returns the number of bytes sent
macro_rules! send {
    ($buf:ident, $msg:ident) => {{
        $buf.fill(0u8);
        let serialised = postcard::to_slice(&$msg, &mut $buf).unwrap();
        serialised.len()
    }};
}

macro_rules! recv {
    ($buf:ident) => {{
        postcard::from_bytes(&$buf).unwrap()
    }};
}

fn main() -> Result<()> {
    // example identity and PIN, never use these...
    const IDENTITY: &[u8] = b"testUser@miracl.com";
    const PIN: u32 = 1234;
    const AUTHORITIES: usize = 2;

    let algorithm = HashAlgorithm::Sha256;
    let today = EpochDay::today();
    let params = SessionParams::new(algorithm).with_time_permits(today);

    // every Trusted Authority issues its share of each secret
    let start = Instant::now();
    let masters: Vec<MasterSecretShare> = (0..AUTHORITIES)
        .map(|_| generate_master_secret_share(&mut OsRng))
        .collect();
    let hcid = hash_identity(algorithm, IDENTITY);
    let server_shares: Vec<_> = masters.iter().map(get_server_secret_share).collect();
    let client_shares: Vec<_> = masters
        .iter()
        .map(|ms| get_client_secret_share(ms, &hcid))
        .collect();
    let permit_shares: Vec<_> = masters
        .iter()
        .map(|ms| get_time_permit_share(algorithm, today, ms, &hcid))
        .collect();

    let server_secret = combine_server_secret(&server_shares)?;
    let token = extract_token(algorithm, IDENTITY, PIN, &combine_client_secret(&client_shares)?)?;
    let permit = combine_time_permit(&permit_shares)?;
    println!(
        "Provisioned `{}` from {} authorities for day {} in {}ms",
        core::str::from_utf8(IDENTITY).unwrap(),
        AUTHORITIES,
        today.get(),
        start.elapsed().as_millis()
    );

    let mut buf = [0u8; 128];
    let mut client_bytes_sent = 0;
    let mut server_bytes_sent = 0;

    for pin in [PIN, PIN + 7] {
        let start = Instant::now();
        let mut client = Client::new(OsRng);
        let mut server = Server::new(OsRng);

        // ===== Client pass 1 =====
        let (client, message) = client.pass1(params, IDENTITY, pin, &token, Some(&permit))?;
        client_bytes_sent += send!(buf, message);

        // ===== Server challenge =====
        let server = server.server1(params, IDENTITY);
        let (server, message) = server.receive_client_message(recv!(buf))?;
        server_bytes_sent += send!(buf, message);

        // ===== Client pass 2 =====
        let ServerMessage::Challenge(y) = recv!(buf);
        let message = client.receive_challenge(y)?;
        client_bytes_sent += send!(buf, message);

        // ===== Server verification =====
        let ClientMessage::Response(v) = recv!(buf) else {
            panic!("expected a response from the client");
        };
        match server.verify_diagnosed(v, &server_secret)? {
            Verdict::Authenticated => println!(
                "PIN {pin} authenticated in {}ms",
                start.elapsed().as_millis()
            ),
            Verdict::Rejected(witness) => println!(
                "PIN {pin} rejected in {}ms, PIN error: {:?}",
                start.elapsed().as_millis(),
                witness.pin_error()
            ),
        }
    }

    println!("Client sent {client_bytes_sent} bytes total");
    println!("Server sent {server_bytes_sent} bytes total");
    Ok(())
}

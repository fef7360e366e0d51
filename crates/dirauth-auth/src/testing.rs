//! Minimal in-process directory server for tests
//!
//! Understands just enough BER to read a BindRequest and answer it with a
//! canned BindResponse.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

const TAG_SEQUENCE: u8 = 0x30;
const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_ENUMERATED: u8 = 0x0a;
const TAG_BIND_REQUEST: u8 = 0x60;
const TAG_BIND_RESPONSE: u8 = 0x61;

#[derive(Debug, Clone, Copy)]
pub enum ServerBehavior {
    /// Answer every bind with success
    Accept,
    /// Answer every bind with the given result code
    Reject { code: u8, message: &'static str },
    /// Close the connection as soon as a bind arrives
    Hangup,
}

pub struct FakeDirectoryServer {
    port: u16,
    bind_dns: Arc<Mutex<Vec<String>>>,
}

impl FakeDirectoryServer {
    pub fn start(behavior: ServerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let bind_dns = Arc::new(Mutex::new(Vec::new()));

        let recorded = bind_dns.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let recorded = recorded.clone();
                thread::spawn(move || serve(stream, behavior, recorded));
            }
        });

        Self { port, bind_dns }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// DNs of every bind request received so far
    pub fn bind_dns(&self) -> Vec<String> {
        self.bind_dns.lock().unwrap().clone()
    }
}

fn serve(mut stream: TcpStream, behavior: ServerBehavior, recorded: Arc<Mutex<Vec<String>>>) {
    // Probe connections close without sending anything
    while let Some(message) = read_message(&mut stream) {
        let Some((msgid, op_tag, op)) = split_message(&message) else {
            return;
        };
        if op_tag != TAG_BIND_REQUEST {
            // Unbind or anything else ends the session
            return;
        }

        if let Some(dn) = bind_dn(op) {
            recorded.lock().unwrap().push(dn);
        }

        let response = match behavior {
            ServerBehavior::Accept => bind_response(msgid, 0, ""),
            ServerBehavior::Reject { code, message } => bind_response(msgid, code, message),
            ServerBehavior::Hangup => return,
        };
        if stream.write_all(&response).is_err() {
            return;
        }
    }
}

/// Read one complete LDAPMessage, `None` on EOF or garbage
fn read_message(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut tag = [0u8; 1];
    stream.read_exact(&mut tag).ok()?;
    if tag[0] != TAG_SEQUENCE {
        return None;
    }

    let mut first = [0u8; 1];
    stream.read_exact(&mut first).ok()?;
    let len = if first[0] & 0x80 == 0 {
        first[0] as usize
    } else {
        let mut bytes = vec![0u8; (first[0] & 0x7f) as usize];
        stream.read_exact(&mut bytes).ok()?;
        bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize)
    };

    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).ok()?;
    Some(body)
}

/// Read a TLV from the front of `data`, returning (tag, value, rest)
fn read_tlv(data: &[u8]) -> Option<(u8, &[u8], &[u8])> {
    let tag = *data.first()?;
    let first = *data.get(1)?;
    let (len, header) = if first & 0x80 == 0 {
        (first as usize, 2)
    } else {
        let n = (first & 0x7f) as usize;
        let bytes = data.get(2..2 + n)?;
        (bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize), 2 + n)
    };
    let value = data.get(header..header + len)?;
    Some((tag, value, &data[header + len..]))
}

fn split_message(body: &[u8]) -> Option<(&[u8], u8, &[u8])> {
    let (tag, msgid, rest) = read_tlv(body)?;
    if tag != TAG_INTEGER {
        return None;
    }
    let (op_tag, op, _) = read_tlv(rest)?;
    Some((msgid, op_tag, op))
}

fn bind_dn(op: &[u8]) -> Option<String> {
    let (_, _version, rest) = read_tlv(op)?;
    let (tag, dn, _) = read_tlv(rest)?;
    if tag != TAG_OCTET_STRING {
        return None;
    }
    String::from_utf8(dn.to_vec()).ok()
}

fn bind_response(msgid: &[u8], code: u8, message: &str) -> Vec<u8> {
    let mut op = vec![TAG_ENUMERATED, 0x01, code, TAG_OCTET_STRING, 0x00];
    op.push(TAG_OCTET_STRING);
    op.push(message.len() as u8);
    op.extend_from_slice(message.as_bytes());

    let mut body = vec![TAG_INTEGER, msgid.len() as u8];
    body.extend_from_slice(msgid);
    body.push(TAG_BIND_RESPONSE);
    body.push(op.len() as u8);
    body.extend(op);

    let mut message = vec![TAG_SEQUENCE, body.len() as u8];
    message.extend(body);
    message
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeepAlive,
    Choke,
    Unchoke,
    Interested,
    NotInterested,
    Extended { id: u8, payload: Vec<u8> },
    Other { id: u8, payload: Vec<u8> },
}

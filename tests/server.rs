//! Line protocol over a real TCP socket.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use spopd::backend::{self, LibraryFile};
use spopd::commands::CommandLayer;
use spopd::model::{Library, LocalQueue};
use spopd::server::{self, FAREWELL, GREETING, REPLY_END};

const LIBRARY: &str = r#"{
    "playlists": [
        { "name": "Draft", "loaded": false },
        { "name": "Rock", "tracks": [
            { "title": "T", "artist": "A", "album": "B", "uri": "spotify:track:t", "duration_secs": 185 }
        ] }
    ]
}"#;

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: tokio::net::tcp::OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect");
        let (reader, writer) = stream.into_split();
        let mut client = Self {
            lines: BufReader::new(reader).lines(),
            writer,
        };
        assert_eq!(client.read_line().await, GREETING);
        client
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.expect("write");
        self.writer.write_all(b"\n").await.expect("write");
    }

    async fn read_line(&mut self) -> String {
        let line = self.lines.next_line().await.expect("read").expect("line");
        format!("{line}\n")
    }

    /// Lines of one command reply, without the terminator.
    async fn read_reply(&mut self) -> String {
        let mut out = String::new();
        loop {
            let line = self.read_line().await;
            if line == REPLY_END {
                return out;
            }
            out.push_str(&line);
        }
    }
}

async fn start(library: Arc<Library>) -> (std::net::SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let layer = CommandLayer::new(library.clone(), LocalQueue::new(library));
    tokio::spawn(async move {
        server::serve(listener, layer, async {
            let _ = stop_rx.await;
        })
        .await
        .expect("serve");
    });
    (addr, stop_tx)
}

#[tokio::test]
async fn session_lists_plays_and_says_goodbye() {
    let library = Arc::new(Library::new());
    let file: LibraryFile = serde_json::from_str(LIBRARY).expect("library json");
    backend::populate(&library, file).await;

    let (addr, stop) = start(library).await;
    let mut client = Client::connect(addr).await;

    client.send("ls").await;
    assert_eq!(client.read_reply().await, "2 Rock (1)\n");

    client.send("ls 2").await;
    assert_eq!(
        client.read_reply().await,
        "1 A -- \"B\" -- \"T\" (3:05) URI:spotify:track:t\n"
    );

    client.send("play 3").await;
    assert_eq!(client.read_reply().await, "- invalid playlist\n");

    client.send("play 2 1").await;
    let status = client.read_reply().await;
    assert_eq!(status.lines().count(), 8);
    assert!(status.starts_with("Status: playing\nTotal tracks: 1\nCurrent track: 1\n"));
    assert!(status.contains("Duration: 3:05\n"));

    client.send("shuffle").await;
    assert_eq!(client.read_reply().await, "- unknown command 'shuffle'\n");

    client.send("bye").await;
    assert_eq!(client.read_line().await, FAREWELL);

    let _ = stop.send(());
}

#[tokio::test]
async fn not_ready_until_backend_publishes() {
    let library = Arc::new(Library::new());
    let (addr, stop) = start(library.clone()).await;
    let mut client = Client::connect(addr).await;

    client.send("ls").await;
    assert_eq!(
        client.read_reply().await,
        "- playlists container not loaded yet\n"
    );

    let file: LibraryFile = serde_json::from_str(LIBRARY).expect("library json");
    backend::populate(&library, file).await;

    client.send("ls").await;
    assert_eq!(client.read_reply().await, "2 Rock (1)\n");

    let _ = stop.send(());
}

#[tokio::test]
async fn every_reply_is_terminated_and_line_breaks_stay_inside_fields() {
    let library = Arc::new(Library::new());
    let file: LibraryFile = serde_json::from_str(
        r#"{ "playlists": [
            { "name": "Late\nNight", "tracks": [
                { "title": "Two\nLines", "artist": "A", "album": "B", "uri": "spotify:track:n", "duration_secs": 60 }
            ] },
            { "name": "Empty" }
        ] }"#,
    )
    .expect("library json");
    backend::populate(&library, file).await;

    let (addr, stop) = start(library).await;
    let mut client = Client::connect(addr).await;

    client.send("ls").await;
    assert_eq!(client.read_reply().await, "1 Late Night (1)\n2 Empty (0)\n");

    client.send("ls 1").await;
    assert_eq!(
        client.read_reply().await,
        "1 A -- \"B\" -- \"Two Lines\" (1:00) URI:spotify:track:n\n"
    );

    client.send("ls 2").await;
    assert_eq!(client.read_reply().await, "\n");

    client.send("goto x").await;
    assert_eq!(client.read_reply().await, "- invalid argument 'x'\n");

    client.send("status").await;
    assert_eq!(client.read_reply().await, "Status: stopped\nTotal tracks: 0\n");

    client.send("bye").await;
    assert_eq!(client.read_line().await, FAREWELL);

    let _ = stop.send(());
}

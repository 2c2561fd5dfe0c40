//! Line-oriented transport over any async reader and writer.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::router::{CommandContext, CommandRouter};

/// Route each input line as a message from `user_id` and write the replies,
/// one blank line after each. Returns the number of replies written.
pub async fn run_console<R, W>(
    router: &CommandRouter,
    reader: R,
    mut writer: W,
    user_id: i64,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let ctx = CommandContext {
        user_id,
        chat_id: user_id,
    };
    let mut lines = reader.lines();
    let mut replies = 0;

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = router.route(&line, &ctx) else {
            continue;
        };
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n\n").await?;
        writer.flush().await?;
        replies += 1;
    }
    Ok(replies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::tests::tracker;

    #[tokio::test]
    async fn replies_to_each_command_line() {
        let router = CommandRouter::with_tracker(tracker());
        let input = b"/check 5\nnot a command\n/check 7-8\n/summary\n".as_slice();
        let mut output = Vec::new();

        let replies = run_console(&router, input, &mut output, 9).await.unwrap();

        assert_eq!(replies, 3);
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Floor 5 added\n\nFloors 7 to 8 added.\n\n"));
        assert!(output.contains("Checked floors: 5, 7, 8\n"));
    }

    #[tokio::test]
    async fn empty_input_writes_nothing() {
        let router = CommandRouter::with_tracker(tracker());
        let mut output = Vec::new();
        let replies = run_console(&router, b"".as_slice(), &mut output, 0)
            .await
            .unwrap();
        assert_eq!(replies, 0);
        assert!(output.is_empty());
    }
}

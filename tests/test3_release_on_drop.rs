use sql_cursor::prelude::*;

fn three_row_script() -> ScriptedExecution {
    ScriptedExecution::new(vec![
        CursorEntry::step_begin(["n"]),
        CursorEntry::row(vec![WireValue::integer(1)]),
        CursorEntry::row(vec![WireValue::integer(2)]),
        CursorEntry::row(vec![WireValue::integer(3)]),
    ])
}

#[test]
fn test3_abandoned_iterate_releases_stream() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut session = ScriptedSession::new();
        session.push(three_row_script());
        let probe = session.probe();
        let mut stmt = Statement::new(session, "SELECT n FROM t");

        let mut rows = stmt.iterate(Params::none()).await?;
        let first = rows.next().await?.expect("first row");
        assert_eq!(first.get("n"), Some(&Value::Int(1)));
        assert_eq!(probe.released(), 0);

        // Abandon the stream with two rows still pending.
        drop(rows);
        assert_eq!(probe.released(), 1);

        Ok::<(), SqlCursorError>(())
    })?;
    Ok(())
}

#[test]
fn test3_error_releases_before_stream_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut session = ScriptedSession::new();
        session.push(ScriptedExecution::new(vec![
            CursorEntry::step_begin(["n"]),
            CursorEntry::error(Some("boom")),
        ]));
        let probe = session.probe();
        let mut stmt = Statement::new(session, "SELECT n FROM t");

        let mut rows = stmt.iterate(Params::none()).await?;
        assert!(rows.next().await.is_err());

        // The entry stream is released at the error entry, while the row
        // stream handle is still alive.
        assert_eq!(probe.released(), 1);
        drop(rows);
        assert_eq!(probe.released(), 1);

        Ok::<(), SqlCursorError>(())
    })?;
    Ok(())
}

#[test]
fn test3_exhaustion_releases_stream() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut session = ScriptedSession::new();
        session.push(three_row_script());
        let probe = session.probe();
        let mut stmt = Statement::new(session, "SELECT n FROM t");

        let mut rows = stmt.iterate(Params::none()).await?;
        while rows.next().await?.is_some() {}

        assert_eq!(probe.released(), 1);

        Ok::<(), SqlCursorError>(())
    })?;
    Ok(())
}

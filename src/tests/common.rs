// src/tests/common.rs

//! Log lines and dates shared by tests.

use ::chrono::NaiveDate;

/// Submission of message `ABC123` from `info@example.com`.
pub const SUB_ABC123: &str = "Jul 26 10:00:01 mx1 postfix/cleanup[4242]: ABC123: warning: header Subject: Monthly report from mx1.example.com[10.0.0.1]; from=<info@example.com> to=<bob@example.org> proto=ESMTP helo=<mx1>";

/// Submission of message `DEF456` from `news@example.com`.
pub const SUB_DEF456: &str = "Jul 26 10:05:00 mx1 postfix/cleanup[4250]: DEF456: warning: header Subject: Weekly news from mx1.example.com[10.0.0.1]; from=<news@example.com> to=<carol@example.net> proto=ESMTP helo=<mx1>";

pub const STATUS_ABC123_SENT_BOB: &str = "Jul 26 10:00:02 mx1 postfix/smtp[4243]: ABC123: to=<bob@example.org>, relay=mx.example.org[10.0.0.2]:25, delay=1.2, delays=0.1/0/0.5/0.6, dsn=2.0.0, status=sent (250 2.0.0 Ok: queued as XYZ)";

pub const STATUS_ABC123_SENT_DAVE: &str = "Jul 26 10:00:03 mx1 postfix/smtp[4243]: ABC123: to=<dave@example.org>, relay=mx.example.org[10.0.0.2]:25, delay=1.3, delays=0.1/0/0.5/0.7, dsn=2.0.0, status=sent (250 2.0.0 Ok: queued as XZZ)";

pub const STATUS_ABC123_BOUNCED_EVE: &str = "Jul 26 10:00:04 mx1 postfix/smtp[4243]: ABC123: to=<eve@example.org>, relay=mx.example.org[10.0.0.2]:25, delay=1.4, delays=0.1/0/0.5/0.8, dsn=5.1.1, status=bounced (host mx.example.org[10.0.0.2] said: 550 5.1.1 user unknown)";

pub const STATUS_DEF456_DEFERRED: &str = "Jul 26 10:05:01 mx1 postfix/smtp[4251]: DEF456: to=<carol@example.net>, relay=none, delay=30, delays=0/0/30/0, dsn=4.4.1, status=deferred (connect to example.net[10.0.0.3]:25: Connection timed out)";

pub const STATUS_DEF456_EXPIRED: &str = "Jul 26 10:05:02 mx1 postfix/qmgr[4200]: DEF456: to=<carol@example.net>, relay=none, delay=30, dsn=4.4.1, status=expired, returned to sender";

pub const LINE_QMGR_ABC123: &str = "Jul 26 10:00:01 mx1 postfix/qmgr[4200]: ABC123: from=<info@example.com>, size=1024, nrcpt=3 (queue active)";

pub const LINE_SMTPD_CONNECT: &str = "Jul 26 09:59:59 mx1 postfix/smtpd[4241]: connect from client.example.com[10.0.0.9]";

/// A submission on another day.
pub const SUB_JUL_2: &str = "Jul  2 08:00:00 mx1 postfix/cleanup[1000]: JUL2AA: warning: header Subject: Early from mx1.example.com[10.0.0.1]; from=<info@example.com> to=<bob@example.org> proto=ESMTP helo=<mx1>";

pub const STATUS_JUL_2_SENT: &str = "Jul  2 08:00:01 mx1 postfix/smtp[1001]: JUL2AA: to=<bob@example.org>, relay=mx.example.org[10.0.0.2]:25, delay=0.5, delays=0.1/0/0.2/0.2, dsn=2.0.0, status=sent (250 2.0.0 Ok)";

pub fn ymd(
    year: i32,
    month: u32,
    day: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Join lines into log file text, each line newline terminated.
pub fn log_text(lines: &[&str]) -> String {
    let mut text: String = String::new();
    for line in lines.iter() {
        text.push_str(line);
        text.push('\n');
    }

    text
}

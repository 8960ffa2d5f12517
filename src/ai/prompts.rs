use serde::{Deserialize, Serialize};

/// Tone used when the caller does not pick one
pub const DEFAULT_TONE: &str = "丁寧";

/// Requested reply length, serialized with the labels the UI shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyLength {
    #[serde(rename = "短")]
    Short,
    #[default]
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "長")]
    Long,
}

impl ReplyLength {
    pub fn label(self) -> &'static str {
        match self {
            ReplyLength::Short => "短",
            ReplyLength::Medium => "中",
            ReplyLength::Long => "長",
        }
    }
}

const SUMMARY_TEMPLATE: &str = "
以下のメール内容を日本語で要約してください。マークダウン記法は使わず、プレーンテキストで出力してください。要約は以下の形式で出力してください：

要約:
[メールの主要な内容を2-3文で簡潔に]

差出人: [差出人情報]
件名: [件名]
重要度: [高/中/低]
返信必要: [要/不要]
期限: [期限がある場合のみ]

推奨アクション:
• [具体的なアクション1]
• [具体的なアクション2]
• [具体的なアクション3]

メール内容:
{email}
";

const REPLY_TEMPLATE: &str = "
あなたは日本語のビジネスメールに精通したアシスタントです。以下のメールに対する自然で適切な返信文を作成してください。マークダウンは使わず、プレーンテキストで出力してください。

出力条件:
- 口調: {tone}（敬語）
- 長さ: {length}（短=2-3文, 中=4-6文, 長=7-10文）
- 件名案を先頭に一行で示す（「件名: ...」形式）
- 本文は冒頭の挨拶→要点への返信→必要な依頼/確認→結びの順
- 本文および署名において、氏名・会社名・部署名・メール・電話番号などの個人情報は推測・生成しない（空欄のまま）。
- 署名は「—」の罫線の下に項目名のみを表示し、コロン以降は空欄にする。

テンプレート:
件名: [件名案]
[本文]

—
署名テンプレート:
会社名:
部署名 / 氏名:
メール:
電話:

参考メール:
{email}
";

/// Prompt asking for a labeled plain-text summary
pub fn summary_prompt(email: &str) -> String {
    SUMMARY_TEMPLATE.replace("{email}", email)
}

/// Prompt asking for a business reply draft
pub fn reply_prompt(email: &str, tone: &str, length: ReplyLength) -> String {
    let tone = match tone.trim() {
        "" => DEFAULT_TONE,
        tone => tone,
    };
    // Email goes last so its text is never re-scanned for placeholders
    REPLY_TEMPLATE
        .replace("{tone}", tone)
        .replace("{length}", length.label())
        .replace("{email}", email)
}

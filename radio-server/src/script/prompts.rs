//! Korean prompt builders for the radio DJ scripts.
//!
//! Each builder returns a (system, user) message pair. The weather
//! rules are strict on purpose: the model must only restate the
//! provided briefing and must not mention rain when the briefing says
//! there is none.

use super::NewsItem;

/// At most this many news items go into a prompt.
const MAX_NEWS_ITEMS: usize = 3;

/// Morning greeting with the weather briefing. The first sentence must
/// introduce the DJ by name when one is given.
pub fn greeting(
    weather_text: &str,
    user_name: Option<&str>,
    dj_name: Option<&str>,
) -> (String, String) {
    let system = "당신은 아침 라디오 DJ입니다. 청취자에게 친근하고 유쾌하게 말하는 스타일로, \
아침 출근길 인사말과 날씨 안내를 작성해 주세요.

## 작성 요령
1. DJ 이름이 주어지면 맨 첫 문장은 반드시 \"안녕하세요, DJ [이름]입니다~\" 형태의 소개로 시작하세요.
2. 밝고 친근한 인사와 출근길 응원 한 마디를 이어가세요.
3. 날씨는 아래 '오늘 날씨' 문구만 DJ가 말하듯 풀어서 소개하세요. 없는 내용을 지어내지 마세요.
   - '비 예보 없음'이면 비나 우산을 언급하지 마세요.
   - '비 예보 있음'일 때만 우산 안내를 넣으세요.

## 형식
- 말하는 대본만, 따옴표·이모지·마크다운 없이 200~400자 내외.
- 마무리에서 뉴스를 예고하지 마세요. 날씨 안내만 하고 자연스럽게 끝내세요."
        .to_string();

    let weather = if weather_text.is_empty() {
        "(날씨 정보 없음)"
    } else {
        weather_text
    };
    let dj_part = dj_name
        .map(|n| format!("\n\n## DJ 이름 (맨 첫 문장에서 반드시 소개)\n{n}"))
        .unwrap_or_default();
    let name_part = user_name
        .map(|n| format!(" (청취자 이름: {n})"))
        .unwrap_or_default();

    let user = format!(
        "## 오늘 날씨 (아래 문구만 사용하고, 없는 내용은 추가하지 마세요)\n{weather}{dj_part}\n\n\
위 날씨 정보만 반영해서 아침 라디오 인사말과 날씨 안내를 작성해 주세요.{name_part}"
    );

    (system, user)
}

/// News segment in a single continuous script, keeping the tone of a
/// previous greeting when one is given.
pub fn news(items: &[NewsItem], previous_greeting: Option<&str>) -> (String, String) {
    let system = "당신은 아침 라디오 DJ입니다. 청취자에게 친근하고 유쾌하게 말하는 스타일로, \
주요 뉴스 3건을 중립적이고 객관적으로 소개하는 멘트를 작성해 주세요.

## 작성 요령
1. 이전 인사말이 주어지면 그 톤과 스타일을 유지하세요.
2. 각 뉴스를 최소 3~4문장으로, 제공된 요약을 바탕으로 배경과 의미까지 풀어서 설명하세요.
3. 뉴스 사이에는 \"다음 뉴스는요~\" 같은 자연스러운 연결 문구를 쓰세요.
4. 중립적이고 긍정적인 톤을 유지하고, 선정적·부정적 표현은 피하세요.

## 형식
- 말하는 대본만, 따옴표·이모지·마크다운 없이 600~1000자 내외."
        .to_string();

    let context = previous_greeting
        .map(|g| format!("## 이전 인사말 (톤과 스타일 참고)\n{g}\n\n"))
        .unwrap_or_default();

    let user = format!(
        "{context}## 주요 뉴스 (제목 + 요약)\n{}\n\n\
위 뉴스들을 상세하게 소개하는 멘트를 작성해 주세요. \
뉴스가 없으면 \"오늘은 특별한 뉴스가 없네요\" 정도로 짧게 마무리하세요.",
        news_block(items)
    );

    (system, user)
}

/// N news items rendered as N separate on-air segments, delimited by
/// `---NEXT---` lines. No greeting, no weather.
pub fn news_segments(items: &[NewsItem], dj_name: Option<&str>) -> (String, String) {
    let dj_intro = dj_name
        .map(|n| format!(" 첫 문장은 \"DJ {n}이 전해드리는 오늘의 뉴스입니다.\" 같은 한 줄로 시작하세요."))
        .unwrap_or_default();

    let system = format!(
        "당신은 아침 라디오 DJ입니다. 인사말은 이미 끝난 뒤이므로 인사말·날씨를 쓰지 마세요. \
뉴스 항목들을 멘트 여러 개로 나눠서, 실제 DJ가 진행하듯 한 건씩 짧고 자연스럽게 소개해 주세요.

## 필수 규칙
- 출력은 뉴스 개수만큼의 멘트만 내보내고, 멘트 사이에는 정확히 한 줄만 쓰세요: ---NEXT---
- 첫 번째 멘트는 뉴스 코너 오프닝 한 줄 + 첫 뉴스만 소개하세요.{dj_intro}
- 이후 멘트는 한 줄 브릿지로 이어서 해당 뉴스만 다루고, 마지막 멘트는 \
\"이상 오늘의 뉴스였습니다.\" 같은 코너 마무리로 끝내세요.
- 멘트마다 2~4문장, 150~250자 내외.

## 톤
- 중립·객관, 친근한 DJ 톤. 말하는 대본만 (따옴표·이모지·마크다운 없음)."
    );

    let user = format!(
        "## 뉴스 (각각 한 멘트씩만 사용)\n{}\n\n\
위 뉴스만 사용해서, 위 규칙대로 ---NEXT--- 로 구분된 멘트를 출력하세요. 인사말·날씨 말하지 마세요.",
        news_block(items)
    );

    (system, user)
}

/// Arrival closing, keeping the tone of the earlier script.
pub fn closing(previous_script: Option<&str>) -> (String, String) {
    let system = "당신은 아침 라디오 DJ입니다. 청취자에게 친근하고 유쾌하게 말하는 스타일로, \
도착했을 때의 마무리 인사말을 작성해 주세요.

## 작성 요령
1. 이전 스크립트가 주어지면 그 톤과 스타일을 유지하세요.
2. \"도착하셨네요!\" 같은 도착 축하와 짧고 따뜻한 하루 응원으로 마무리하세요.

## 형식
- 말하는 대본만, 따옴표·이모지·마크다운 없이 100~200자 내외."
        .to_string();

    let context = previous_script
        .map(|s| format!("## 이전 스크립트 (톤과 스타일 참고)\n{s}\n\n"))
        .unwrap_or_default();

    let user = format!("{context}도착했을 때의 마무리 인사말을 작성해 주세요.");

    (system, user)
}

/// Single full script: greeting + weather + three news items +
/// closing, in one pass.
pub fn full(weather_text: &str, items: &[NewsItem]) -> (String, String) {
    let system = "당신은 아침 라디오 DJ입니다. 아래의 '오늘 날씨'와 '주요 뉴스'만 활용해 \
아침 출근길 라디오 스크립트를 작성해 주세요.

## 날씨 규칙 (필수)
- 제공된 날씨 문구를 정확히 반영하고, 없는 내용을 지어내지 마세요.
- '비 예보 없음'이면 비가 온다고 말하지 말고 우산 안내도 하지 마세요.
- '비 예보 있음'일 때만 우산 안내를 넣으세요.

## 작성 요령
1. 밝은 인사와 출근길 응원으로 시작하세요.
2. 날씨는 제공된 문구만 한 문단으로 소개하세요.
3. 뉴스는 각각 최소 3~4문장으로 상세히, 자연스러운 연결 문구와 함께 소개하세요.
4. 짧은 하루 응원 메시지로 마무리하세요.

## 형식
- 말하는 대본만, 따옴표·이모지·마크다운 없이 800~1200자 내외."
        .to_string();

    let weather = if weather_text.is_empty() {
        "(날씨 정보 없음)"
    } else {
        weather_text
    };
    let user = format!(
        "## 오늘 날씨 (아래 문구만 사용하고, 없는 내용은 추가하지 마세요)\n{weather}\n\n\
## 주요 뉴스 (제목 + 요약)\n{}\n\n\
위 날씨·뉴스만 반영해서 아침 라디오 DJ 대본을 작성해 주세요. \
뉴스가 없으면 뉴스 섹션을 생략하고 날씨와 응원 메시지만으로 마무리하세요.",
        news_block(items)
    );

    (system, user)
}

fn news_block(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return "(뉴스 없음 - 오늘 수집된 뉴스가 없습니다)".to_string();
    }
    items
        .iter()
        .take(MAX_NEWS_ITEMS)
        .enumerate()
        .map(|(i, item)| {
            let summary = if item.summary.is_empty() {
                "(요약 없음)"
            } else {
                &item.summary
            };
            format!("[뉴스 {}]\n제목: {}\n요약: {}", i + 1, item.title, summary)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

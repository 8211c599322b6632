use ratatui::{prelude::*, widgets::*};

use crate::models::{Balance, BlockNumber, Network, Vote, VoteType};

/// Format a planck amount in whole tokens with two decimals, e.g. `1,234.50 DOT`
pub fn format_balance(amount: Balance, network: Network) -> String {
    let unit = 10u128.pow(network.token_decimals());
    let whole = amount / unit;
    let cents = (amount % unit) * 100 / unit;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}.{:02} {}", grouped, cents, network.token_symbol())
}

/// Block count as a rough duration at 6s blocks
pub fn format_blocks(blocks: BlockNumber) -> String {
    let minutes = blocks as u64 / 10;
    if minutes >= 24 * 60 && minutes % (24 * 60) == 0 {
        format!("{}d", minutes / (24 * 60))
    } else if minutes >= 60 && minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}m", minutes)
    }
}

/// Vote color
pub fn vote_color(vote: VoteType) -> Color {
    match vote {
        VoteType::Aye => Color::Green,
        VoteType::Nay => Color::Red,
    }
}

/// Accept / reject buttons under the card
pub fn render_action_bar<'a>(remaining: usize) -> Paragraph<'a> {
    let line = Line::from(vec![
        Span::styled(" ✗ Nay (←) ", Style::default().fg(Color::Black).bg(Color::Red).bold()),
        Span::raw("    "),
        Span::styled(" ♥ Aye (→) ", Style::default().fg(Color::Black).bg(Color::Green).bold()),
    ]);
    let left = Line::from(Span::styled(
        format!("{} left", remaining),
        Style::default().fg(Color::DarkGray),
    ));

    Paragraph::new(vec![line, Line::raw(""), left]).alignment(Alignment::Center)
}

/// Summary table of every vote cast, in order
pub fn render_votes_table<'a>(votes: &[Vote]) -> Table<'a> {
    let rows: Vec<Row> = votes
        .iter()
        .enumerate()
        .map(|(i, v)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(format!("#{}", v.index)),
                Cell::from(v.vote.as_str()).style(Style::default().fg(vote_color(v.vote)).bold()),
            ])
        })
        .collect();

    let ayes = votes.iter().filter(|v| v.vote == VoteType::Aye).count();
    let nays = votes.len() - ayes;

    Table::new(rows, [Constraint::Length(4), Constraint::Length(14), Constraint::Min(5)])
        .header(
            Row::new(vec!["", "Referendum", "Vote"])
                .style(Style::default().fg(Color::Yellow).bold())
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your votes ")
                .title_bottom(Line::from(format!(" {} aye / {} nay ", ayes, nays)).right_aligned()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(0, Network::Polkadot), "0.00 DOT");
        assert_eq!(format_balance(12_345_670_000_000, Network::Polkadot), "1,234.56 DOT");
        assert_eq!(format_balance(1_000_000 * 10u128.pow(12), Network::Kusama), "1,000,000.00 KSM");
        assert_eq!(format_balance(5 * 10u128.pow(10), Network::Westend), "0.05 WND");
    }

    #[test]
    fn test_format_blocks() {
        assert_eq!(format_blocks(28 * 14_400), "28d");
        assert_eq!(format_blocks(1_800), "3h");
        assert_eq!(format_blocks(100), "10m");
    }
}

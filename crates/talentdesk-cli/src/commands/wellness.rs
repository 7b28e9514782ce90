use talentdesk_application::Portal;

pub fn tip(portal: &Portal, category: &str) {
    println!("💡 {}", portal.wellness.daily_tip(category));
}

use talentdesk_application::Portal;
use talentdesk_core::navigation::NavigationDecision;

pub fn guard(portal: &Portal, path: &str) {
    match portal.guard(path) {
        NavigationDecision::Admit => println!("✅ {} admitted", path),
        NavigationDecision::RedirectToLogin { notice } => {
            println!("🔒 {} redirects to /login", path);
            println!("  {}", notice);
        }
        NavigationDecision::Block { notice } => {
            println!("⛔ {} blocked", path);
            println!("  {}", notice);
        }
    }
}

//! 터미널 출력 포맷팅 유틸리티
//!
//! `AppContext` 구성 과정을 단계별로 출력합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               CLINIC AUTH BACKEND                ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Connecting credential store
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 1: Credential store ready (2 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
///
/// ```text
///    ├─ UserStore: MongoDB (timeout 5000ms)
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 컨텍스트 구성 완료 요약을 출력합니다
pub fn print_final_summary(infrastructure: usize, services: usize) {
    println!();
    print_boxed_title("APPLICATION CONTEXT READY");
    println!("   📦 Infrastructure: {}", infrastructure);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", infrastructure + services);
    println!();
}

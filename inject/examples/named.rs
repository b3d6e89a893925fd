use fibre_inject::{abstraction, global, resolve, ConfigError, Injectable};

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}
impl Injectable for EmailSender {}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}
impl Injectable for SmsSender {}

abstraction!(MessageSender: EmailSender, SmsSender);

fn main() -> Result<(), ConfigError> {
  // --- Registration ---
  // Both implementations live under the same abstraction, told apart by alias.
  global().bind::<dyn MessageSender>().named("email").to_constructor(|| EmailSender)?;
  global().bind::<dyn MessageSender>().named("sms").to_constructor(|| SmsSender)?;

  // --- Resolution ---
  let email_notifier = resolve!(trait MessageSender, "email");
  let sms_notifier = resolve!(trait MessageSender, "sms");

  let result1 = email_notifier.send("test@example.com", "Hello from Fibre!");
  let result2 = sms_notifier.send("+123456789", "Hello from Fibre!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
  Ok(())
}
